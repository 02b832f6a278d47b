use log::*;

pub fn prepare_test_env() {
    dotenvy::from_filename(".env.test").ok();
    let _ = env_logger::try_init();
    trace!("🚀️ Logging initialised");
}
