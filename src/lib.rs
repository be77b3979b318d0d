pub mod cli;
pub mod model;
pub mod parser;
pub mod runner;
pub mod state;
pub mod submit;
pub mod timer;
pub mod tui;
pub mod ui;
pub mod view;
