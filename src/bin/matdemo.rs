use densemat::{Mat, MatError, MatShape};
use log::info;

fn main() {
    init_logger();

    match run() {
        Ok(out) => println!("{out}"),
        Err(e) => {
            log::error!("{}", e);
            eprintln!("\x1b[0;31merror\x1b[0m: {e}");
            std::process::exit(1)
        }
    }
}

fn run() -> Result<String, MatError> {
    let a = Mat::from_rows(vec![
        vec![1, 2, 3],
        vec![2, 3, 4],
        vec![3, 4, 5],
        vec![3, 5, 7],
    ])?;

    let b = Mat::from_rows(vec![
        vec![0, 1, 0],
        vec![1, 0, 0],
        vec![0, 0, 1],
    ])?;

    info!("a: {:?}, b: {:?}", a.shape(), b.shape());

    let p = a.checked_mul(&b)?;

    Ok(format!(
        "a * b =\n{p}\n\na^t =\n{}\n\n2 * a =\n{}",
        a.transpose(),
        2 * &a
    ))
}

fn init_logger() {
    use simplelog::*;

    let mut cb = ConfigBuilder::new();
    cb.set_location_level(LevelFilter::Off);
    cb.set_target_level(LevelFilter::Off);
    cb.set_thread_level(LevelFilter::Off);
    let config = cb.build();

    let _ = TermLogger::init(
        log_level(),
        config,
        TerminalMode::Mixed,
        ColorChoice::Auto
    );
}

fn log_level() -> log::LevelFilter {
    use log::LevelFilter::*;
    match std::env::var("MATDEMO_LOG").as_deref() {
        Ok("info")  => Info,
        Ok("debug") => Debug,
        Ok("trace") => Trace,
        _ => Off,
    }
}
