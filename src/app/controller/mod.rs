pub mod research_controllers;
