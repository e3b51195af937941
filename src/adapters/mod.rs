pub mod pulldown;
