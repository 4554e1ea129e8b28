use crate::cmd::VersionArgs;
use crate::exit::{CliResult, SUCCESS};

pub fn run(args: VersionArgs) -> CliResult<i32> {
    if !args.extended {
        println!("klvprims {}", env!("CARGO_PKG_VERSION"));
        return Ok(SUCCESS);
    }

    println!("name: klvprims");
    println!("version: {}", env!("CARGO_PKG_VERSION"));
    println!("target_os: {}", std::env::consts::OS);
    println!("target_arch: {}", std::env::consts::ARCH);
    println!(
        "build_target: {}",
        option_env!("KLVPRIMS_BUILD_TARGET").unwrap_or("unknown")
    );
    println!(
        "features: misb={}, async={}, cli=true",
        cfg!(feature = "misb"),
        cfg!(feature = "async")
    );
    println!("registries: ST 0601, ST 0102, ST 0903");

    Ok(SUCCESS)
}
