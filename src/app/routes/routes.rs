use actix_web::{web, HttpResponse, Responder};
use actix_multipart::Multipart;
use futures::{StreamExt, TryStreamExt};
use std::{sync::Arc};
use serde::{Serialize, Deserialize};

use crate::{ app::{controller::research_controllers::ResearchController}};

#[derive(Deserialize, Serialize)]
pub struct NewsSummaryRequest {
  query: String,
  api_key: Option<String>,
  model_name: Option<String>,
  model_provider: Option<String>,
}

#[derive(Deserialize, Serialize)]
pub struct CompareStocksRequest {
  ticker1: String,
  ticker2: String,
}

// Multipart fields collected from a report upload. The file part carries the
// PDF bytes; everything else is optional text.
#[derive(Default)]
struct ReportUploadForm {
  file: Vec<u8>,
  question: Option<String>,
  api_key: Option<String>,
  model_name: Option<String>,
  model_provider: Option<String>,
}


pub struct Routes;

impl Routes {

  #[allow(unused)]
  pub fn new() -> Self {
    Routes {}
  }

  pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/").route(web::get().to(Self::health)));
    cfg.service(web::resource("/models").route(web::get().to(Self::get_models)));
    cfg.service(web::resource("/report/summary").route(web::post().to(Self::report_summary)));
    cfg.service(web::resource("/report/question").route(web::post().to(Self::report_question)));
    cfg.service(web::resource("/news/summary").route(web::post().to(Self::news_summary)));
    cfg.service(web::resource("/stocks/compare").route(web::post().to(Self::compare_stocks)));
  }

  async fn health() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
      "status": "ok",
      "Info": "Welcome to the AI stock research service.",
      "code": 200,
    }))
  }

  async fn get_models(controller: web::Data<Arc<ResearchController>>) -> impl Responder {
    match controller.get_available_models().await {
      Ok(models) => HttpResponse::Ok().json(models),
      Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({"error": e.to_string()})),
    }
  }

  async fn collect_upload(mut payload: Multipart) -> Result<ReportUploadForm, actix_web::Error> {
    let mut form: ReportUploadForm = ReportUploadForm::default();

    while let Some(mut field) = payload.try_next().await? {
      let name: String = field.name().to_string();

      let mut data: Vec<u8> = Vec::new();
      while let Some(chunk) = field.next().await {
        let chunk = chunk?;
        data.extend_from_slice(&chunk);
      }

      match name.as_str() {
        "file" => form.file = data,
        "question" => form.question = Some(String::from_utf8_lossy(&data).to_string()),
        "api_key" => form.api_key = Some(String::from_utf8_lossy(&data).to_string()),
        "model_name" => form.model_name = Some(String::from_utf8_lossy(&data).to_string()),
        "model_provider" => form.model_provider = Some(String::from_utf8_lossy(&data).to_string()),
        other => log::warn!("Ignoring unknown upload field: {}", other),
      }
    }

    Ok(form)
  }

  async fn report_summary(controller: web::Data<Arc<ResearchController>>, payload: Multipart) -> impl Responder {
    let form: ReportUploadForm = match Self::collect_upload(payload).await {
      Ok(form) => form,
      Err(e) => return HttpResponse::BadRequest().json(serde_json::json!({"error": e.to_string()})),
    };

    if form.file.is_empty() {
      return HttpResponse::BadRequest().json(serde_json::json!({"error": "Missing PDF upload in the file field"}));
    }

    let result = controller.summarize_report(&form.file, form.api_key.as_deref(), form.model_name.as_deref(), form.model_provider.as_deref()).await;

    match result {
      Ok(body) => HttpResponse::Ok().json(body),
      Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
          "error": e.to_string(),
      }))
    }
  }

  async fn report_question(controller: web::Data<Arc<ResearchController>>, payload: Multipart) -> impl Responder {
    let form: ReportUploadForm = match Self::collect_upload(payload).await {
      Ok(form) => form,
      Err(e) => return HttpResponse::BadRequest().json(serde_json::json!({"error": e.to_string()})),
    };

    if form.file.is_empty() {
      return HttpResponse::BadRequest().json(serde_json::json!({"error": "Missing PDF upload in the file field"}));
    }

    let question: String = match form.question.as_deref() {
      Some(question) if !question.trim().is_empty() => question.to_string(),
      _ => return HttpResponse::BadRequest().json(serde_json::json!({"error": "Missing question field"})),
    };

    let result = controller.answer_report_question(&form.file, &question, form.api_key.as_deref(), form.model_name.as_deref(), form.model_provider.as_deref()).await;

    match result {
      Ok(body) => HttpResponse::Ok().json(body),
      Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
          "error": e.to_string(),
      }))
    }
  }

  async fn news_summary(controller: web::Data<Arc<ResearchController>>, request: web::Json<NewsSummaryRequest>) -> impl Responder {
    let result = controller.summarize_news(&request.query, request.api_key.as_deref(), request.model_name.as_deref(), request.model_provider.as_deref()).await;

    match result {
      Ok(body) => HttpResponse::Ok().json(body),
      Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
          "error": e.to_string(),
      }))
    }
  }

  async fn compare_stocks(controller: web::Data<Arc<ResearchController>>, request: web::Json<CompareStocksRequest>) -> impl Responder {
    let result = controller.compare_stocks(&request.ticker1, &request.ticker2).await;

    match result {
      Ok(body) => HttpResponse::Ok().json(body),
      Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
          "error": e.to_string(),
      }))
    }
  }

}
