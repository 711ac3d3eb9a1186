// Adapters layer: concrete implementations of the domain ports for external services.

pub mod scryfall;

pub use scryfall::ScryfallResolver;
