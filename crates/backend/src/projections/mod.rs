pub mod p900_organogram;
