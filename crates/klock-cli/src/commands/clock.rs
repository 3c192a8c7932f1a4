use std::io::Write;

use klock_core::{SystemClock, Ticker, TimeOfDay, WallClock, TICK_PERIOD};

fn now_display() -> String {
    TimeOfDay::from_naive_time(SystemClock.now()).to_string()
}

pub fn run(watch: bool) -> Result<(), Box<dyn std::error::Error>> {
    if !watch {
        println!("{}", now_display());
        return Ok(());
    }

    let rt = super::runtime()?;
    rt.block_on(async {
        let mut ticker = Ticker::start(TICK_PERIOD);
        let ctrl_c = tokio::signal::ctrl_c();
        tokio::pin!(ctrl_c);

        print!("\r{:<8}", now_display());
        let _ = std::io::stdout().flush();
        loop {
            tokio::select! {
                tick = ticker.next() => {
                    if tick.is_none() {
                        break;
                    }
                    print!("\r{:<8}", now_display());
                    let _ = std::io::stdout().flush();
                }
                _ = &mut ctrl_c => break,
            }
        }
        ticker.cancel();
        println!();
    });
    Ok(())
}
