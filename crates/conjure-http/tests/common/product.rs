//! A hand-written stand-in for generated client code.

use std::sync::{Arc, OnceLock};

use conjure_http::{ConjureRequest, HttpClient, HttpError, Service};
use conjure_serde::ConjureDecoder;
use conjure_types::{
    BeanDefinition, BeanValue, ConjureType, ConjureValue, FieldDefinition, FromConjureValue,
    IntoConjureValue, TypeBuilder, TypeDescriptor, ValueError,
};

#[derive(Debug, Clone, PartialEq)]
pub struct CreateDatasetRequest {
    pub file_system_id: String,
    pub path: String,
}

fn create_dataset_request_def() -> Arc<BeanDefinition> {
    static DEF: OnceLock<Arc<BeanDefinition>> = OnceLock::new();
    Arc::clone(DEF.get_or_init(|| {
        let t = TypeBuilder::new();
        Arc::new(BeanDefinition::new(
            "CreateDatasetRequest",
            [
                FieldDefinition::new("file_system_id", "fileSystemId", t.str()),
                FieldDefinition::new("path", "path", t.str()),
            ],
        ))
    }))
}

impl ConjureType for CreateDatasetRequest {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::Bean(create_dataset_request_def())
    }
}

impl FromConjureValue for CreateDatasetRequest {
    fn from_conjure_value(value: ConjureValue) -> Result<Self, ValueError> {
        let bean = match value {
            ConjureValue::Bean(bean) => bean,
            other => {
                return Err(ValueError::Conversion {
                    expected: "bean",
                    actual: other.kind(),
                })
            }
        };
        let mut fields = bean.into_fields();
        let mut take = |name: &str| {
            fields.shift_remove(name).ok_or_else(|| ValueError::MissingField {
                bean: "CreateDatasetRequest".into(),
                field: name.into(),
            })
        };
        Ok(Self {
            file_system_id: String::from_conjure_value(take("file_system_id")?)?,
            path: String::from_conjure_value(take("path")?)?,
        })
    }
}

impl IntoConjureValue for CreateDatasetRequest {
    fn into_conjure_value(self) -> ConjureValue {
        let fields = [
            ("file_system_id", self.file_system_id.into_conjure_value()),
            ("path", self.path.into_conjure_value()),
        ];
        match BeanValue::new(create_dataset_request_def(), fields) {
            Ok(bean) => ConjureValue::Bean(bean),
            Err(err) => unreachable!("fields match the definition: {err}"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SimpleService {
    client: HttpClient,
    decoder: ConjureDecoder,
}

impl Service for SimpleService {
    fn new(client: HttpClient) -> Self {
        Self {
            client,
            decoder: ConjureDecoder::new(),
        }
    }
}

impl SimpleService {
    pub fn client(&self) -> &HttpClient {
        &self.client
    }

    pub fn test_endpoint(&self, string: &str, decoration: &[String]) -> Result<String, HttpError> {
        let request = ConjureRequest::post("/catalog/testEndpoint")
            .query_param("decoration", &decoration.to_vec().into_conjure_value())?
            .body(&string.into_conjure_value());
        self.client.execute(request)?.json(&self.decoder)
    }

    pub fn get_dataset(&self, dataset_rid: &str) -> Result<CreateDatasetRequest, HttpError> {
        let request = ConjureRequest::get("/catalog/datasets/{datasetRid}")
            .path_param("datasetRid", &dataset_rid.into_conjure_value())?;
        self.client.execute(request)?.json(&self.decoder)
    }

    pub fn call(&self, route: &str) -> Result<Option<String>, HttpError> {
        self.client.execute(ConjureRequest::get(route))?.json(&self.decoder)
    }
}
