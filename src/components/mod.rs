pub mod match_card;
