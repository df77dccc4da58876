pub mod jetbrains;
