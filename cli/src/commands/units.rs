use colored::*;
use unicode_width::UnicodeWidthStr;

use recipebook_common::config::Config;
use recipebook_common::recipe::Unit;

use crate::terminal::{colors, print};

pub fn units(cfg: &Config) {
    print::header("ingredient units", cfg.quiet);

    let key_width = Unit::VALID.iter().map(|u| u.name().width()).max().unwrap_or(0);
    for unit in Unit::VALID {
        match cfg.quiet {
            0 => print::aligned_line(unit.name(), key_width, abbreviation(unit).color(colors::MUTED)),
            _ => print::print(unit.name()),
        }
    }
}

fn abbreviation(unit: Unit) -> &'static str {
    match unit {
        Unit::Gram => "g",
        Unit::Milliliter => "ml",
        Unit::Teaspoon => "tsp",
        Unit::Tablespoon => "tbsp",
        Unit::Piece => "pc",
        Unit::Unknown => "?",
    }
}
