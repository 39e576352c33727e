use std::fs;
use std::fs::OpenOptions;
use std::path::Path;
use serde::de::DeserializeOwned;
use serde::Serialize;
use crate::utils::utils_errors::ArmIKError;

/// Convenience struct that holds many class functions related to file utils.
pub struct FileUtils;
impl FileUtils {
    pub fn read_file_contents_to_string(p: &Path) -> Result<String, ArmIKError> {
        return fs::read_to_string(p).map_err(|e| {
            ArmIKError::new_generic_error_str(&format!("Could not read file {:?}: {}", p, e), file!(), line!())
        });
    }
    /// Saves given object to a file as a JSON string.  The object must be serializable using serde json.
    pub fn save_object_to_file_as_json<T: Serialize>(object: &T, p: &Path) -> Result<(), ArmIKError> {
        if let Some(parent) = p.parent() {
            fs::create_dir_all(parent).map_err(|e| ArmIKError::new_generic_error_str(&e.to_string(), file!(), line!()))?;
        }

        let file_res = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(p);
        return match file_res {
            Ok(f) => {
                serde_json::to_writer(f, object).map_err(|e| ArmIKError::new_serialization_error(std::any::type_name::<T>(), &e.to_string(), file!(), line!()))
            }
            Err(e) => {
                Err(ArmIKError::new_generic_error_str(e.to_string().as_str(), file!(), line!()))
            }
        }
    }
    /// Reads object that was serialized by serde JSON from a file.
    pub fn load_object_from_json_file<T: DeserializeOwned>(p: &Path) -> Result<T, ArmIKError> {
        let contents = Self::read_file_contents_to_string(p)?;
        return Self::load_object_from_json_string(&contents);
    }
    pub fn load_object_from_json_string<T: DeserializeOwned>(json_str: &str) -> Result<T, ArmIKError> {
        let o_res = serde_json::from_str(json_str);
        return match o_res {
            Ok(o) => { Ok(o) }
            Err(e) => {
                Err(ArmIKError::new_serialization_error(std::any::type_name::<T>(), &format!("The given json string is incompatible with the requested type: {}", e), file!(), line!()))
            }
        }
    }
}
