pub mod card;
pub mod color;
pub mod deck;
pub mod hand;
pub mod knowledge;
pub mod player;
pub mod rank;
pub mod table;
