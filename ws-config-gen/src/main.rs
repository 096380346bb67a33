use std::env;
use std::process;
use ws_config_gen::WsConfigGenCli;

fn main() {
    let args: Vec<String> = env::args().collect();
    let cli = WsConfigGenCli::new();

    if let Err(e) = cli.run(args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
