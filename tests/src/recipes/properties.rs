#![cfg(test)]
use std::collections::HashSet;

use proptest::prelude::*;
use proptest::test_runner::Config;

use recipebook_common::contracts::{CreateRecipeCommand, IngredientInput, StepInput};
use recipebook_common::recipe::Unit;
use recipebook_core::validation::build_recipe;

fn unit_name() -> impl Strategy<Value = String> {
    (prop::sample::select(Unit::VALID.to_vec()), any::<bool>()).prop_map(|(unit, upper)| {
        match upper {
            true => unit.name().to_uppercase(),
            false => unit.name().to_lowercase(),
        }
    })
}

fn ingredient_input() -> impl Strategy<Value = IngredientInput> {
    ("[A-Za-z][A-Za-z ]{0,19}", 0.01f64..5000.0, unit_name()).prop_map(|(name, quantity, unit)| {
        IngredientInput { name, quantity, unit }
    })
}

fn step_input() -> impl Strategy<Value = StepInput> {
    (1i32..100, "[a-z][a-z ]{0,29}").prop_map(|(step_number, text)| StepInput { step_number, text })
}

fn valid_request() -> impl Strategy<Value = CreateRecipeCommand> {
    (
        "[A-Za-z][A-Za-z ]{0,39}",
        0i32..600,
        0i32..600,
        -2i32..6,
        prop::collection::vec(ingredient_input(), 1..8),
        prop::collection::vec(step_input(), 1..8),
    )
        .prop_map(|(title, prep, cook, category, ingredients, instruction_steps)| {
            CreateRecipeCommand {
                title,
                preparation_time_minutes: prep,
                cooking_time_minutes: cook,
                category,
                ingredients,
                instruction_steps,
                ..Default::default()
            }
        })
}

fn foreign_unit() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("Unknown".to_string()),
        Just("unknown".to_string()),
        "[A-Za-z]{1,12}".prop_filter("must not be a known unit", |raw| {
            !Unit::VALID.iter().any(|u| u.name().eq_ignore_ascii_case(raw))
        }),
    ]
}

proptest! {
    #![proptest_config(Config::with_cases(128))]

    #[test]
    fn steps_come_out_sorted(command in valid_request()) {
        let recipe = build_recipe(&command).unwrap();

        let got: Vec<u32> = recipe.instruction_steps.iter().map(|s| s.step_number).collect();
        let mut expected: Vec<u32> = command
            .instruction_steps
            .iter()
            .map(|s| s.step_number as u32)
            .collect();
        expected.sort();
        prop_assert_eq!(got, expected);
    }

    #[test]
    fn every_identity_is_unique(command in valid_request()) {
        let recipe = build_recipe(&command).unwrap();

        let mut ids = HashSet::new();
        prop_assert!(ids.insert(recipe.id));
        for ingredient in &recipe.ingredients {
            prop_assert!(ids.insert(ingredient.id));
            prop_assert_eq!(ingredient.recipe_id, recipe.id);
        }
        for step in &recipe.instruction_steps {
            prop_assert!(ids.insert(step.id));
            prop_assert_eq!(step.recipe_id, recipe.id);
        }
        prop_assert_eq!(ids.len(), 1 + recipe.ingredients.len() + recipe.instruction_steps.len());
    }

    #[test]
    fn units_outside_the_vocabulary_are_rejected(
        command in valid_request(),
        unit in foreign_unit(),
        at in any::<prop::sample::Index>(),
    ) {
        let mut command = command;
        let slot = at.index(command.ingredients.len());
        command.ingredients[slot].unit = unit.clone();

        let err = build_recipe(&command).unwrap_err();
        prop_assert!(err.is_validation());
        prop_assert!(err.to_string().contains(unit.trim()), "{}", err);
    }

    #[test]
    fn validating_twice_differs_only_in_identity_and_time(command in valid_request()) {
        let mut first = build_recipe(&command).unwrap();
        let second = build_recipe(&command).unwrap();
        prop_assert_ne!(first.id, second.id);

        first.id = second.id;
        first.created_at = second.created_at;
        first.updated_at = second.updated_at;
        for (a, b) in first.ingredients.iter_mut().zip(&second.ingredients) {
            a.id = b.id;
            a.recipe_id = b.recipe_id;
        }
        for (a, b) in first.instruction_steps.iter_mut().zip(&second.instruction_steps) {
            a.id = b.id;
            a.recipe_id = b.recipe_id;
        }
        prop_assert_eq!(first, second);
    }
}
