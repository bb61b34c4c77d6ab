pub mod probability_bar;
