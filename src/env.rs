use std::env;
use std::path::PathBuf;

pub struct Env {}

impl Env {
    pub const SYS_NAME: &'static str = "rankviz";

    pub fn proj_root() -> PathBuf {
        env::current_dir().expect("rankviz: failed to get current directory")
    }

    pub fn plots_root() -> PathBuf {
        let mut path = Self::proj_root();
        path.push("plots");
        path
    }
}
