use serde::de::DeserializeOwned;
use serde::Serialize;
use crate::utils::utils_errors::ArmIKError;
use crate::utils::utils_files::FileUtils;

pub trait ToAndFromJsonString: Serialize + DeserializeOwned {
    fn convert_to_json_string(&self) -> Result<String, ArmIKError> {
        return serde_json::to_string(self).map_err(|e| ArmIKError::new_serialization_error(std::any::type_name::<Self>(), &e.to_string(), file!(), line!()));
    }
    fn load_from_json_string(json_str: &str) -> Result<Self, ArmIKError> where Self: Sized {
        return FileUtils::load_object_from_json_string(json_str);
    }
}
impl <T> ToAndFromJsonString for T where T: Serialize + DeserializeOwned {  }

pub trait ToAndFromRonString: Serialize + DeserializeOwned {
    fn convert_to_ron_string(&self) -> Result<String, ArmIKError> {
        return ron::to_string(self).map_err(|e| ArmIKError::new_serialization_error(std::any::type_name::<Self>(), &e.to_string(), file!(), line!()));
    }
    fn load_from_ron_string(ron_string: &str) -> Result<Self, ArmIKError> where Self: Sized {
        let load: Result<Self, _> = ron::from_str(ron_string);
        return match load {
            Ok(load) => { Ok(load) }
            Err(e) => {
                Err(ArmIKError::new_serialization_error(std::any::type_name::<Self>(), &format!("Could not load ron string {:?} into correct type: {}", ron_string, e), file!(), line!()))
            }
        }
    }
}
impl <T> ToAndFromRonString for T where T: Serialize + DeserializeOwned {  }
