pub mod slot_instance;
