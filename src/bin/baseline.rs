//! Promote most recent results to baseline.
//!
//! ```text
//! baseline              # nothing to do
//! baseline all          # promote every index with a recent result
//! baseline 3 7 12       # promote only these indices
//! ```
//!
//! Directories come from the `GALLERY_*` environment variables. The gallery
//! is always re-rendered after promotion.

use std::error::Error;

use visual_gallery::baseline::{Selection, promote_and_render};
use visual_gallery::{config, logging};

fn main() -> Result<(), Box<dyn Error>> {
    logging::init(false);

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(selection) = Selection::from_args(args.as_slice())? else {
        println!("nothing to do");
        return Ok(());
    };

    match selection {
        Selection::All => println!("baselining all"),
        Selection::Indices(_) => println!("baselining some"),
    }

    let (promotion, _summary) = promote_and_render(config::get(), &selection)?;
    for line in promotion.lines() {
        println!("{}", line);
    }
    println!("updated gallery");

    Ok(())
}
