pub mod separate;
