use colored::*;

use recipebook_common::contracts::RecipeOverviewItem;
use recipebook_common::recipe::{Duration, RecipeCategory};

use crate::terminal::colors;

type Detail = (String, ColoredString);

pub fn category_name(code: i32) -> &'static str {
    RecipeCategory::from_code(code)
        .unwrap_or_default()
        .name()
}

pub fn overview_to_details(item: &RecipeOverviewItem) -> Vec<Detail> {
    let mut details: Vec<Detail> = vec![
        ("Id".to_string(), item.id.to_string().color(colors::MUTED)),
        ("Category".to_string(), category_name(item.category).color(colors::ACCENT)),
        ("Time".to_string(), time_to_value(item.preparation_minutes, item.cooking_minutes)),
    ];

    if let Some(description) = &item.description {
        details.push(("About".to_string(), description.normal()));
    }

    if let Some(image_url) = &item.image_url {
        details.push(("Image".to_string(), image_url.color(colors::MUTED)));
    }

    let ingredients: ColoredString = match item.ingredient_names.is_empty() {
        true => "none".dimmed(),
        false => item.ingredient_names.join(", ").normal(),
    };
    details.push(("Ingredients".to_string(), ingredients));

    details
}

fn time_to_value(preparation: u32, cooking: u32) -> ColoredString {
    let total = Duration::from_minutes(preparation.saturating_add(cooking));
    format!(
        "{} {}",
        total.to_string().bold(),
        format!("({preparation} prep + {cooking} cook)").color(colors::MUTED)
    )
    .normal()
}
