use clap::Parser;
use truck_tco_toolbox::{app, config};

/// 프로그램의 엔트리 포인트. 설정을 로드한 뒤 명령을 실행한다.
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    if let Err(err) = try_run() {
        eprintln!("오류: {err}");
        std::process::exit(1);
    }
}

fn try_run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = app::Cli::parse();
    let cfg = config::load_or_default()?;
    app::run(cli, &cfg)?;
    Ok(())
}
