use std::{env, fs, path::PathBuf};

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=OUT_DIR");

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let completions_dir = out_dir.join("completions");

    fs::create_dir_all(&completions_dir).unwrap();

    let mut cmd = clap::Command::new("postgrab")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Postgrab Contributors")
        .about("Resolve post URLs to clean text")
        .arg(clap::arg!(<URL> "Post URL (twitter.com, x.com, vxtwitter.com, fxtwitter.com, fixupx.com, fixvx.com)"))
        .arg(
            clap::arg!(-o --output <FILE> "Output file (default: stdout)")
                .value_name("FILE")
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(
            clap::arg!(-f --format <FORMAT> "Output format (text, json)")
                .value_name("FORMAT")
                .default_value("text")
                .value_parser(["text", "txt", "json"]),
        )
        .arg(clap::arg!(--timeout <SECS> "HTTP timeout per attempt in seconds").default_value("10"))
        .arg(clap::arg!(--"user-agent" <UA> "Custom User-Agent for HTTP requests").value_name("UA"))
        .arg(clap::arg!(--"max-attempts" <NUM> "Attempts against the syndication endpoint").default_value("3"))
        .arg(
            clap::arg!(--"retry-delay-ms" <MS> "Backoff unit between syndication attempts in milliseconds")
                .default_value("1000"),
        )
        .arg(clap::arg!(-v --verbose "Print progress to stderr"));

    clap_complete::generate_to(clap_complete::shells::Bash, &mut cmd, "postgrab", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Zsh, &mut cmd, "postgrab", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Fish, &mut cmd, "postgrab", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::PowerShell, &mut cmd, "postgrab", &completions_dir).unwrap();

    println!(
        "cargo:warning=Shell completions generated in: {}",
        completions_dir.display()
    );
}
