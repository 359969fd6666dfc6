pub mod ar;
