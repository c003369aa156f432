#![cfg(test)]
use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use recipebook_common::contracts::{CreateRecipeCommand, GetRecipeListQuery};
use recipebook_common::error::RecipeError;
use recipebook_common::recipe::{RecipeCategory, Unit};
use recipebook_common::repository::RecipeFilter;
use recipebook_core::recipe_bus;

use super::utils::{UnreachableStore, ingredient, pasta, request, step, stores};

/// A well-formed request is stored and comes back through the list query.
#[tokio::test]
async fn create_pasta_round_trips() {
    for store in stores() {
        let bus = recipe_bus(store.repository.clone()).unwrap();
        let cancel = CancellationToken::new();

        let created = bus.send(pasta(), &cancel).await.unwrap();

        let stored = store
            .repository
            .list(&RecipeFilter::default(), &cancel)
            .await
            .unwrap();
        assert_eq!(stored.len(), 1, "[{}] expected one recipe", store.name);
        let recipe = &stored[0];
        assert_eq!(recipe.id, created.recipe_id);
        assert_eq!(recipe.ingredients.len(), 1);
        assert_eq!(recipe.ingredients[0].unit, Unit::Gram);
        assert_eq!(recipe.instruction_steps.len(), 1);
        assert_eq!(recipe.preparation_time.minutes(), 10);

        let listed = bus.query(GetRecipeListQuery::default(), &cancel).await.unwrap();
        assert_eq!(listed.items.len(), 1);
        assert_eq!(listed.items[0].id, created.recipe_id);
        assert_eq!(listed.items[0].ingredient_names, vec!["Pasta".to_string()]);
    }
}

#[tokio::test]
async fn empty_ingredients_are_rejected_before_storage() {
    for store in stores() {
        let bus = recipe_bus(store.repository.clone()).unwrap();
        let cancel = CancellationToken::new();

        let err = bus
            .send(
                CreateRecipeCommand {
                    ingredients: vec![],
                    ..pasta()
                },
                &cancel,
            )
            .await
            .unwrap_err();

        match err {
            RecipeError::Validation(msg) => assert_eq!(msg, "At least one ingredient is required."),
            other => panic!("[{}] expected validation error, got {other:?}", store.name),
        }
        let stored = store.repository.list(&RecipeFilter::default(), &cancel).await.unwrap();
        assert!(stored.is_empty(), "[{}] nothing should be stored", store.name);
    }
}

#[tokio::test]
async fn unknown_unit_lists_the_vocabulary() {
    for store in stores() {
        let bus = recipe_bus(store.repository.clone()).unwrap();

        let err = bus
            .send(
                CreateRecipeCommand {
                    ingredients: vec![ingredient("Flour", 1.0, "Kilo")],
                    ..pasta()
                },
                &CancellationToken::new(),
            )
            .await
            .unwrap_err();

        let msg = err.to_string();
        assert!(err.is_validation(), "[{}] {msg}", store.name);
        assert!(msg.contains("Kilo"), "{msg}");
        for unit in Unit::VALID {
            assert!(msg.contains(unit.name()), "{msg} should list {unit}");
        }
    }
}

#[tokio::test]
async fn steps_are_stored_in_step_order() {
    for store in stores() {
        let bus = recipe_bus(store.repository.clone()).unwrap();
        let cancel = CancellationToken::new();

        bus.send(
            CreateRecipeCommand {
                instruction_steps: vec![step(2, "Drain"), step(1, "Boil")],
                ..pasta()
            },
            &cancel,
        )
        .await
        .unwrap();

        let stored = store.repository.list(&RecipeFilter::default(), &cancel).await.unwrap();
        let order: Vec<(u32, &str)> = stored[0]
            .instruction_steps
            .iter()
            .map(|s| (s.step_number, s.text.as_str()))
            .collect();
        assert_eq!(order, vec![(1, "Boil"), (2, "Drain")], "[{}]", store.name);
    }
}

#[tokio::test]
async fn out_of_range_category_lists_everything() {
    for store in stores() {
        let bus = recipe_bus(store.repository.clone()).unwrap();
        let cancel = CancellationToken::new();
        for req in [
            request("Chili", RecipeCategory::Meat.code(), &["Beans", "Beef"]),
            request("Salad", RecipeCategory::Vegan.code(), &["Lettuce"]),
        ] {
            bus.send(req, &cancel).await.unwrap();
        }

        let unfiltered = bus.query(GetRecipeListQuery::default(), &cancel).await.unwrap();
        for code in [42, -1, RecipeCategory::Unknown.code()] {
            let result = bus
                .query(
                    GetRecipeListQuery {
                        search: None,
                        category: Some(code),
                    },
                    &cancel,
                )
                .await
                .unwrap();
            assert_eq!(result, unfiltered, "[{}] category {code}", store.name);
        }
        assert_eq!(unfiltered.items.len(), 2);
    }
}

#[tokio::test]
async fn list_filters_and_orders_the_same_on_every_store() {
    for store in stores() {
        let bus = recipe_bus(store.repository.clone()).unwrap();
        let cancel = CancellationToken::new();
        for req in [
            request("stew", RecipeCategory::Meat.code(), &["Beef", "Carrot"]),
            request("Carrot cake", RecipeCategory::Vegetarian.code(), &["Carrot", "Flour"]),
            request("Avocado toast", RecipeCategory::Vegan.code(), &["Avocado", "Bread"]),
        ] {
            bus.send(req, &cancel).await.unwrap();
        }

        let all = bus.query(GetRecipeListQuery::default(), &cancel).await.unwrap();
        let titles: Vec<&str> = all.items.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["Avocado toast", "Carrot cake", "stew"], "[{}]", store.name);

        let carrots = bus
            .query(
                GetRecipeListQuery {
                    search: Some("  CARROT ".into()),
                    category: None,
                },
                &cancel,
            )
            .await
            .unwrap();
        let titles: Vec<&str> = carrots.items.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["Carrot cake", "stew"], "[{}]", store.name);

        let vegetarian_carrots = bus
            .query(
                GetRecipeListQuery {
                    search: Some("carrot".into()),
                    category: Some(RecipeCategory::Vegetarian.code()),
                },
                &cancel,
            )
            .await
            .unwrap();
        assert_eq!(vegetarian_carrots.items.len(), 1);
        assert_eq!(vegetarian_carrots.items[0].title, "Carrot cake");
        assert_eq!(
            vegetarian_carrots.items[0].ingredient_names,
            vec!["Carrot".to_string(), "Flour".to_string()]
        );
    }
}

#[tokio::test]
async fn storage_failure_reaches_the_caller() {
    let bus = recipe_bus(Arc::new(UnreachableStore)).unwrap();
    let cancel = CancellationToken::new();

    let err = bus.send(pasta(), &cancel).await.unwrap_err();
    assert!(matches!(err, RecipeError::Storage(_)), "{err:?}");

    let err = bus.query(GetRecipeListQuery::default(), &cancel).await.unwrap_err();
    assert!(matches!(err, RecipeError::Storage(_)), "{err:?}");
}

#[tokio::test]
async fn cancelled_dispatch_stores_nothing() {
    for store in stores() {
        let bus = recipe_bus(store.repository.clone()).unwrap();
        let cancelled = CancellationToken::new();
        cancelled.cancel();

        let err = bus.send(pasta(), &cancelled).await.unwrap_err();
        assert!(matches!(err, RecipeError::Cancelled), "[{}] {err:?}", store.name);

        let err = bus.query(GetRecipeListQuery::default(), &cancelled).await.unwrap_err();
        assert!(matches!(err, RecipeError::Cancelled), "[{}] {err:?}", store.name);

        let stored = store
            .repository
            .list(&RecipeFilter::default(), &CancellationToken::new())
            .await
            .unwrap();
        assert!(stored.is_empty(), "[{}]", store.name);
    }
}
