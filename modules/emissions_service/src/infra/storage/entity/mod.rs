//! SeaORM entities, one module per table

pub mod fabric_block_inventory;
pub mod fabric_block_recipe_process;
pub mod fabric_block_type;
pub mod garment_recipe_fabric_block;
pub mod garment_recipe_process;
pub mod garment_type;
pub mod location;
pub mod preparation_record;
pub mod process_resource_consumption;
pub mod process_type;
pub mod resource_type;
