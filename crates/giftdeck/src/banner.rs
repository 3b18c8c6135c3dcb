use colored::Colorize;

const BANNER: &str = r#"
        _  __ _      _           _
   __ _(_)/ _| |_ __| | ___  ___| | __
  / _` | | |_| __/ _` |/ _ \/ __| |/ /
 | (_| | |  _| || (_| |  __/ (__|   <
  \__, |_|_|  \__\__,_|\___|\___|_|\_\
  |___/
"#;

pub fn print_banner_with_version() {
    println!("{}", BANNER.magenta());
    println!(
        "  {} {}",
        "giftdeck".bold(),
        env!("CARGO_PKG_VERSION").dimmed()
    );
    println!("  {}\n", "a music-synchronized gift slideshow".italic());
}
