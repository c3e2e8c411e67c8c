use clap::Parser;
use student_roster::config::cli;
use student_roster::utils::logger;
use student_roster::{CliConfig, RosterContext, RosterError};

fn main() {
    let args = CliConfig::parse();

    // 載入並驗證配置
    let config = match cli::load_config(&args) {
        Ok(config) => config,
        Err(e) => fail(&e),
    };

    // 初始化日誌：預設寫入日誌檔，指定 --no-log-file 時輸出到 stderr
    let ctx = match &config.logging.file {
        Some(log_file) => {
            match logger::file_dispatch(log_file, &config.log_level(), config.log_format()) {
                Ok(dispatch) => RosterContext::new(dispatch),
                Err(e) => {
                    eprintln!("❌ 無法開啟日誌檔 '{}': {}", log_file, e);
                    std::process::exit(1);
                }
            }
        }
        None => {
            logger::init_cli_logger(args.verbose);
            RosterContext::default()
        }
    };

    // 執行指令，結果輸出到 stdout
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if let Err(e) = cli::run(&ctx, &args.command, &config.storage.file, &mut out) {
        fail(&e);
    }
}

// 輸出使用者友善的錯誤訊息並依錯誤類型結束程式
fn fail(e: &RosterError) -> ! {
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 建議: {}", e.recovery_suggestion());
    std::process::exit(cli::exit_code(e));
}
