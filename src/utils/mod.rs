pub mod zlib;
