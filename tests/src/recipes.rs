mod dispatch;
mod integration;
mod properties;
mod utils;
