use env_logger::Env;

/// 初始化日誌，`RUST_LOG` 會覆寫預設等級
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };

    env_logger::Builder::from_env(Env::default().default_filter_or(default_level))
        .format_timestamp_secs()
        .format_target(false)
        .init();
}
