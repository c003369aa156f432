//! End-to-end checks of the recipe catalog, driven through the dispatcher
//! the same way the binary drives it.

#[cfg(test)]
mod recipes;
