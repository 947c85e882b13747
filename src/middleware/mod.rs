pub mod resource_path;
pub mod validated_json;
