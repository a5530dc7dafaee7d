pub mod research_service;
