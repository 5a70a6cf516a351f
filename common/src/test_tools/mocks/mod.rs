pub mod volume_describer;
