use qaa::iop::{Spectrum, compute};
use qaa::sat_bands::{SatBands, Satellites};
use std::collections::BTreeMap;

fn main() {
    // NASA comparison vector at the nominal QAA wavelengths
    let nominal = Spectrum::new([0.001974, 0.002570, 0.002974, 0.001670, 0.000324]);
    let result = compute(nominal);

    println!("{}", result);
    for message in result.get_messages() {
        println!("  - {}", message);
    }

    // Same reflectance read from MODIS band centres
    let rrs = BTreeMap::from([
        (412, 0.001974),
        (443, 0.002570),
        (488, 0.002974),
        (547, 0.001670),
        (667, 0.000324),
    ]);

    match SatBands::new(Satellites::Modis).spectrum(&rrs) {
        Ok(spectrum) => println!("\nMODIS chla: {:.4} mg m-3", compute(spectrum).chla()),
        Err(e) => eprintln!("{}", e),
    }
}
