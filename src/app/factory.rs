use actix_web::{web, App};
use std::sync::Arc;

use crate::app::config::Config;
use crate::app::routes::routes::Routes;

use super::controller::research_controllers::ResearchController;
use super::services::research_service::ResearchService;

#[derive(Clone)]
pub struct AppState {
  pub research_controller: Arc<ResearchController>
}

impl AppState {

  #[allow(unused)]
  pub fn new(app_config: &Config) -> Self {
    let research_service: Arc<ResearchService> = Arc::new(ResearchService::new(app_config.clone()));
    let research_controller : Arc<ResearchController> = Arc::new(ResearchController::new(research_service));
    AppState { research_controller }
  }
}

#[allow(unused)]
pub struct CreateApp {
  app_state: AppState,
  app_settings: Config,
}

impl CreateApp {
  pub fn new(app_settings: Config) -> Self {
    let app_state: AppState = AppState::new(&app_settings);
    CreateApp { app_state, app_settings  }
  }

  pub fn build_app(&self,) -> App<impl actix_web::dev::ServiceFactory<actix_web::dev::ServiceRequest,Config = (),Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,Error = actix_web::Error,InitError = (),>,> {
    App::new()
    .app_data(web::Data::new(self.app_state.research_controller.clone()))
    .configure(Routes::configure)
  }
}
