pub mod commands;
pub mod handlers;

pub use commands::command_argument_builder;
pub use handlers::{
    OutputSettings, crawl_options_from_args, handle_crawl, output_settings_from_args,
    parse_url_line,
};
