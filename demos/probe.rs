use capability_util::{have_capability, CapabilityId, CapabilityQueryResult};
use simplelog::*;

fn main() {
    CombinedLogger::init(vec![TermLogger::new(
        LevelFilter::Debug,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )])
    .unwrap();

    for cap in CapabilityId::ALL {
        match have_capability(*cap) {
            CapabilityQueryResult::Held => println!("{cap:>28}: held"),
            CapabilityQueryResult::NotHeld => println!("{cap:>28}: not held"),
            CapabilityQueryResult::QueryFailed(e) => println!("{cap:>28}: query failed ({e})"),
        }
    }

    #[cfg(all(target_os = "linux", feature = "userns"))]
    match capability_util::linux::can_create_user_namespace() {
        Ok(can) => println!("{:>28}: {can}", "create user namespace"),
        Err(e) => println!("{:>28}: probe failed ({e})", "create user namespace"),
    }
}
