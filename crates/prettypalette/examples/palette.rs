use std::env;
use std::str::FromStr;

use prettypalette::fit::{fit_cosine_palette_robust, validate_fit};
use prettypalette::{generate_harmonious_palette, GenerationOptions, HarmonyCategory};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Print a palette per harmony category, or only the named one, and then fit
/// coefficients to the palette's colors again.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let categories = match env::args().nth(1) {
        Some(name) => vec![HarmonyCategory::from_str(&name)?],
        None => HarmonyCategory::ALL.to_vec(),
    };

    let options = GenerationOptions::builder().steps(6).build();
    let mut rng = StdRng::seed_from_u64(0x5eed);

    for category in categories {
        let palette = generate_harmonious_palette(category, &options, &mut rng);
        let colors = palette.hex_colors();
        println!(
            "{:<20} {:?} after {:>3} attempts: {}",
            category.name(),
            palette.quality(),
            palette.attempts(),
            colors.join(" ")
        );

        let fitted = fit_cosine_palette_robust(&colors, 1_000, 0.005, 4, &mut rng)?;
        let diagnostics = validate_fit(&colors, &fitted)?;
        println!(
            "{:<20} average error {:.2}, maximum error {:.2}",
            "",
            diagnostics.average_error(),
            diagnostics.max_error()
        );
    }

    Ok(())
}
