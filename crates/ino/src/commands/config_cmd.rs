//! `ino config`: inspect and initialise configuration.

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::{self, Config, Settings};
use crate::error::CliError;
use crate::output;

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Show => {
            let settings = config::resolve(global)?;
            let out = output::render_single(&global.output, &settings, detail, |s| {
                s.state_dir.display().to_string()
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ConfigCommand::Path => {
            output::print_output(&config::config_path().display().to_string(), global.quiet);
            Ok(())
        }

        ConfigCommand::Init { force } => {
            let path = config::config_path();
            config::write_config(&path, &Config::default(), force)?;
            output::status(global, &format!("Wrote {}", path.display()));
            Ok(())
        }
    }
}

fn detail(s: &Settings) -> String {
    [
        format!("arduino_cli: {}", s.arduino_cli.display()),
        format!("state_dir:   {}", s.state_dir.display()),
        format!("arity:       {}", s.arity),
        format!("config_file: {}", config::config_path().display()),
    ]
    .join("\n")
}
