//! Parameter listing command.

use abyssal_engine::Param;

pub fn run() -> anyhow::Result<()> {
    println!("Parameters:\n");
    println!(
        "  {:<12} {:<12} {:>5} {:>8} {:>8} {:>8}",
        "ID", "NAME", "NUM", "MIN", "MAX", "DEFAULT"
    );
    for param in Param::ALL {
        let d = param.descriptor();
        let default = param
            .default_value()
            .map_or_else(|| "unset".to_string(), |v| format!("{v:.2}"));
        println!(
            "  {:<12} {:<12} {:>5} {:>8.2} {:>8.2} {:>8}",
            d.string_id, d.name, d.id.0, d.min, d.max, default
        );
    }
    println!("\nSet with: abyssal process IN OUT --param <id>=<value>");
    Ok(())
}
