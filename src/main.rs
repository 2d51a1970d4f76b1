use serde::Serialize;

use volume_discount_function::run::cart_lines_discounts_generate_run;
use volume_discount_function::schema::CartInput;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let input: CartInput = serde_json::from_reader(std::io::BufReader::new(std::io::stdin()))?;
    let mut out = std::io::stdout();
    let mut serializer = serde_json::Serializer::new(&mut out);
    cart_lines_discounts_generate_run(input).serialize(&mut serializer)?;
    Ok(())
}
