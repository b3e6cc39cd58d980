use anyhow::Result;
use owo_colors::OwoColorize;

use hevhub_core::region::RegionRules;

pub fn run(postcode: Option<String>, lat: Option<f64>, lng: Option<f64>) -> Result<()> {
    let rules = RegionRules::default();

    match (postcode, lat, lng) {
        (Some(postcode), _, _) => {
            if rules.is_in_region(&postcode) {
                println!(
                    "{} {} is inside the Highlands service region",
                    "\u{2713}".green(),
                    postcode.to_uppercase().bold()
                );
            } else {
                println!(
                    "{} {} is outside the service region.\n  Accepted postcode areas: IV, HS, KW, ZE and parts of PH, PA, AB and KA",
                    "\u{2717}".red(),
                    postcode.to_uppercase().bold()
                );
            }
        }
        (None, Some(lat), Some(lng)) => {
            if rules.is_point_in_region(lat, lng) {
                println!(
                    "{} ({lat}, {lng}) is inside the Highlands service region",
                    "\u{2713}".green()
                );
            } else {
                println!(
                    "{} ({lat}, {lng}) is outside the service region",
                    "\u{2717}".red()
                );
            }
        }
        _ => anyhow::bail!("Pass a postcode, or both --lat and --lng"),
    }

    Ok(())
}
