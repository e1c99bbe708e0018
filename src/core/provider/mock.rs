//! Recording provider doubles for unit tests.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};

use super::*;
use crate::core::domain::KeyDetail;
use crate::core::obs::ObsLocation;
use crate::error::ProviderError;

/// In-memory KMS that records every call as `operation[:argument]`.
#[derive(Debug, Default)]
pub struct MockKms {
    pub tag_pages: RefCell<VecDeque<std::result::Result<ListByTagsResponse, ProviderError>>>,
    pub keys: Vec<KeyDetail>,
    pub aliases: Vec<String>,
    /// Operation name -> error it fails with.
    pub failures: HashMap<&'static str, ProviderError>,
    pub calls: RefCell<Vec<String>>,
}

impl MockKms {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_keys(mut self, keys: Vec<KeyDetail>) -> Self {
        self.keys = keys;
        self
    }

    pub fn with_aliases(mut self, aliases: &[&str]) -> Self {
        self.aliases = aliases.iter().map(|a| a.to_string()).collect();
        self
    }

    pub fn with_tag_page(
        self,
        page: std::result::Result<ListByTagsResponse, ProviderError>,
    ) -> Self {
        self.tag_pages.borrow_mut().push_back(page);
        self
    }

    pub fn failing(mut self, operation: &'static str, error: ProviderError) -> Self {
        self.failures.insert(operation, error);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    /// Calls other than the listing ones.
    pub fn mutations(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|c| !c.starts_with("list_"))
            .collect()
    }

    fn record(&self, operation: &'static str, argument: &str) -> Result<()> {
        let entry = if argument.is_empty() {
            operation.to_string()
        } else {
            format!("{}:{}", operation, argument)
        };
        self.calls.borrow_mut().push(entry);
        match self.failures.get(operation) {
            Some(error) => Err(error.clone().into()),
            None => Ok(()),
        }
    }
}

impl KmsClient for MockKms {
    fn list_kms_by_tags(&self, request: &ListByTagsRequest) -> Result<ListByTagsResponse> {
        self.record("list_kms_by_tags", &request.offset)?;
        match self.tag_pages.borrow_mut().pop_front() {
            Some(page) => page.map_err(Into::into),
            None => Ok(ListByTagsResponse::default()),
        }
    }

    fn list_keys(&self, request: &ListKeysRequest) -> Result<ListKeysResponse> {
        self.record("list_keys", &request.key_spec)?;
        Ok(ListKeysResponse {
            key_details: self.keys.clone(),
        })
    }

    fn enable_key_rotation(&self, request: &OperateKeyRequest) -> Result<()> {
        self.record("enable_key_rotation", &request.key_id)
    }

    fn disable_key_rotation(&self, request: &OperateKeyRequest) -> Result<()> {
        self.record("disable_key_rotation", &request.key_id)
    }

    fn enable_key(&self, request: &OperateKeyRequest) -> Result<OperateKeyResponse> {
        self.record("enable_key", &request.key_id)?;
        Ok(OperateKeyResponse {
            key_info: KeyStateInfo {
                key_id: request.key_id.clone(),
                key_state: "2".to_string(),
            },
        })
    }

    fn disable_key(&self, request: &OperateKeyRequest) -> Result<OperateKeyResponse> {
        self.record("disable_key", &request.key_id)?;
        Ok(OperateKeyResponse {
            key_info: KeyStateInfo {
                key_id: request.key_id.clone(),
                key_state: "3".to_string(),
            },
        })
    }

    fn create_key(&self, request: &CreateKeyRequest) -> Result<CreateKeyResponse> {
        self.record("create_key", "")?;
        let created = self.mutations().iter().filter(|c| *c == "create_key").count();
        Ok(CreateKeyResponse {
            key_info: CreatedKeyInfo {
                key_id: format!("new-{}-{}", created, request.key_alias),
                domain_id: "d-1".to_string(),
            },
        })
    }

    fn list_aliases(&self) -> Result<ListAliasesResponse> {
        self.record("list_aliases", "")?;
        Ok(ListAliasesResponse {
            body: vec![AliasGroup {
                aliases: self
                    .aliases
                    .iter()
                    .map(|alias| AliasEntry {
                        alias: alias.clone(),
                        key_id: None,
                    })
                    .collect(),
            }],
        })
    }

    fn create_alias(&self, request: &CreateAliasRequest) -> Result<()> {
        self.record("create_alias", &request.alias)
    }
}

/// Object store returning one canned answer.
#[derive(Debug)]
pub struct MockObs {
    pub response: std::result::Result<ObjectResponse, ProviderError>,
    pub calls: RefCell<Vec<ObsLocation>>,
}

impl MockObs {
    pub fn ok(body: &str) -> Self {
        Self::answer(Ok(ObjectResponse {
            status: 200,
            body: body.as_bytes().to_vec(),
            error_code: None,
            error_message: None,
        }))
    }

    pub fn answer(response: std::result::Result<ObjectResponse, ProviderError>) -> Self {
        Self {
            response,
            calls: RefCell::new(Vec::new()),
        }
    }
}

impl ObjectStore for MockObs {
    fn get_object(&self, location: &ObsLocation) -> Result<ObjectResponse> {
        self.calls.borrow_mut().push(location.clone());
        self.response.clone().map_err(Into::into)
    }
}
