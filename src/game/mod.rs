pub mod engine;
pub mod evaluator;
pub mod input_translator;
pub mod scoring;
pub mod word_list;

pub use engine::GameEngine;
pub use input_translator::InputTranslator;
pub use word_list::WordList;
