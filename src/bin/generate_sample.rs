use std::io::Write;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

/// Bell-shaped popularity around `peak`, scaled to `height` births.
fn popularity(year: i32, peak: i32, spread: f64, height: f64) -> f64 {
    let d = (year - peak) as f64;
    height * (-(d * d) / (2.0 * spread * spread)).exp()
}

fn main() {
    let mut rng = StdRng::seed_from_u64(42);
    let years = 1880..=2022;

    // (name, sex, peak year, spread in years, peak births)
    let names: [(&str, &str, i32, f64, f64); 12] = [
        ("Mary", "F", 1920, 30.0, 70000.0),
        ("Linda", "F", 1947, 8.0, 99000.0),
        ("Jennifer", "F", 1972, 10.0, 63000.0),
        ("Emma", "F", 2008, 25.0, 22000.0),
        ("Olivia", "F", 2015, 20.0, 19000.0),
        ("Jordan", "F", 1995, 6.0, 5000.0),
        ("John", "M", 1915, 35.0, 88000.0),
        ("Robert", "M", 1935, 20.0, 70000.0),
        ("Michael", "M", 1965, 18.0, 92000.0),
        ("Liam", "M", 2017, 12.0, 20000.0),
        ("Noah", "M", 2012, 15.0, 19000.0),
        ("Jordan", "M", 1993, 9.0, 21000.0),
    ];

    let output_path = "sample_names.zip";
    let file = std::fs::File::create(output_path).expect("Failed to create output file");
    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default();
    let mut rows = 0usize;

    for year in years {
        let mut lines = String::new();
        for sex in ["F", "M"] {
            for &(name, _, peak, spread, height) in names.iter().filter(|n| n.1 == sex) {
                let noise = 0.9 + 0.2 * rng.gen::<f64>();
                let count = (popularity(year, peak, spread, height) * noise).round() as u64;
                // The SSA omits names given fewer than five times.
                if count >= 5 {
                    lines.push_str(&format!("{name},{sex},{count}\n"));
                    rows += 1;
                }
            }
            // One invented name per year and sex, never repeated: a one-hit wonder.
            let wonder = format!("Zz{}{}", sex.to_ascii_lowercase(), year);
            lines.push_str(&format!("{wonder},{sex},{}\n", rng.gen_range(5..25u64)));
            rows += 1;
        }

        zip.start_file(format!("yob{year}.txt"), options)
            .expect("Failed to start archive entry");
        zip.write_all(lines.as_bytes())
            .expect("Failed to write archive entry");
    }

    zip.start_file("NationalReadMe.pdf", options)
        .expect("Failed to start archive entry");
    zip.write_all(b"Synthetic sample data, not SSA statistics.\n")
        .expect("Failed to write archive entry");
    zip.finish().expect("Failed to finish archive");

    println!("Wrote {rows} name records for 1880-2022 to {output_path}");
    println!("View them with: BABY_NAMES_ARCHIVE={output_path} cargo run");
}
