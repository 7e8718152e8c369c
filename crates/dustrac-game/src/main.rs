use std::process::ExitCode;

use dustrac_game::bootstrap::{self, Bootstrap, NativePlatform};
use dustrac_game::settings::Settings;

fn main() -> ExitCode {
    let settings_path = Settings::default_path();
    let result = bootstrap::init_logging()
        .and_then(|()| Bootstrap::new(settings_path.as_path(), NativePlatform).run());

    bootstrap::report(result)
}
