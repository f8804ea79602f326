//! Stand-in for `ps` used by the integration tests.
//!
//! MOCK_PS_FIXTURE   file whose contents are printed instead of the built-in listing
//! MOCK_PS_ARGS_OUT  file that receives the arguments, one per line
//! MOCK_PS_EXIT      exit code to finish with

use std::fs;
use std::io::Write;

const LISTING: &str = "\
USER         PID %CPU %MEM    VSZ   RSS TTY      STAT START   TIME COMMAND
root           1  0.0  0.1 167772160 12288 ?   Ss   08:00   0:02 /sbin/init
alice       4242  0.3  2.4 2791728742 5242880 pts/0 Sl+ 09:15  1:07 python train.py
";

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();

    if let Ok(path) = std::env::var("MOCK_PS_ARGS_OUT") {
        if let Err(e) = fs::write(&path, args.join("\n")) {
            eprintln!("Failed to record args to {}: {}", path, e);
        }
    }

    let listing = match std::env::var("MOCK_PS_FIXTURE") {
        Ok(path) => fs::read(&path).unwrap_or_else(|e| {
            eprintln!("Failed to read fixture {}: {}", path, e);
            std::process::exit(2);
        }),
        Err(_) => LISTING.as_bytes().to_vec(),
    };

    let mut stdout = std::io::stdout();
    stdout.write_all(&listing).ok();
    stdout.flush().ok();

    let code = std::env::var("MOCK_PS_EXIT")
        .ok()
        .and_then(|c| c.parse::<i32>().ok())
        .unwrap_or(0);
    std::process::exit(code);
}
