use std::error::Error;
use std::fs;
use std::path::Path;

use fs_extra::dir::CopyOptions;

const BUNDLE: &str = "../frontend/dist";
const STATIC_ROOT: &str = "static";

/// Copies the trunk bundle next to the server so `include_dir!` can embed
/// it. Without a bundle the server still builds and answers 404.
fn main() -> Result<(), Box<dyn Error>> {
    let bundle = Path::new(BUNDLE);
    let static_root = Path::new(STATIC_ROOT);

    if bundle.is_dir() {
        if static_root.exists() {
            fs::remove_dir_all(static_root)?;
        }
        fs::create_dir_all(static_root)?;
        fs_extra::dir::copy(bundle, static_root, &CopyOptions::new().overwrite(true))?;
    } else {
        println!("cargo:warning=no frontend bundle at {BUNDLE}, serving an empty console");
    }
    fs::create_dir_all(static_root.join("dist"))?;

    println!("cargo:rerun-if-changed={BUNDLE}");
    Ok(())
}
