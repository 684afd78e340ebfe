use std::env;

fn main() {
    // Host builds (tests, dry-run) have no ESP-IDF environment to forward.
    if env::var("CARGO_CFG_TARGET_OS").as_deref() == Ok("espidf") {
        embuild::espidf::sysenv::output();
    }
}
