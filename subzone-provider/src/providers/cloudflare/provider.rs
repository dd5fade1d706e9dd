//! Cloudflare ExternalDnsClient 实现

use async_trait::async_trait;

use crate::error::Result;
use crate::traits::{ErrorContext, ExternalDnsClient, ProviderErrorMapper};
use crate::types::{ExternalRecord, RecordType, Zone, ZoneCredentials, ZoneInfo};

use super::types::CloudflareRecordBody;
use super::{AUTO_TTL, CloudflareClient, CloudflareDnsRecord, CloudflareZone, MAX_PAGE_SIZE_RECORDS};

impl CloudflareClient {
    fn zone_context(zone_id: &str, record_name: Option<String>) -> ErrorContext {
        ErrorContext {
            record_name,
            zone_id: Some(zone_id.to_string()),
        }
    }
}

#[async_trait]
impl ExternalDnsClient for CloudflareClient {
    fn id(&self) -> &'static str {
        "cloudflare"
    }

    async fn create_record(
        &self,
        zone: &Zone,
        name: &str,
        record_type: RecordType,
        target: &str,
    ) -> Result<ExternalRecord> {
        let creds = &zone.credentials;
        creds.validate_format(self.provider_name())?;

        let full_name = zone.full_name(name);
        let body = CloudflareRecordBody {
            record_type: record_type.as_str(),
            name: Some(&full_name),
            content: target,
            ttl: AUTO_TTL,
            proxied: false,
        };

        let response = self
            .post::<CloudflareDnsRecord, _>(
                &creds.api_token,
                &format!("/zones/{}/dns_records", creds.zone_id),
                &body,
                Self::zone_context(&creds.zone_id, Some(full_name.clone())),
            )
            .await?;

        let record = response
            .result
            .ok_or_else(|| self.parse_error("响应中缺少 result 字段"))?;
        log::info!(
            "[cloudflare] created {} record {full_name} (id={})",
            record_type,
            record.id
        );
        Ok(record.into())
    }

    async fn update_record(
        &self,
        zone: &Zone,
        external_id: &str,
        record_type: RecordType,
        target: &str,
    ) -> Result<ExternalRecord> {
        let creds = &zone.credentials;
        creds.validate_format(self.provider_name())?;

        let body = CloudflareRecordBody {
            record_type: record_type.as_str(),
            name: None,
            content: target,
            ttl: AUTO_TTL,
            proxied: false,
        };

        let response = self
            .patch::<CloudflareDnsRecord, _>(
                &creds.api_token,
                &format!("/zones/{}/dns_records/{external_id}", creds.zone_id),
                &body,
                Self::zone_context(&creds.zone_id, None),
            )
            .await?;

        let record = response
            .result
            .ok_or_else(|| self.parse_error("响应中缺少 result 字段"))?;
        log::info!("[cloudflare] updated record {} (id={external_id})", record.name);
        Ok(record.into())
    }

    async fn delete_record(&self, zone: &Zone, external_id: &str) -> Result<()> {
        let creds = &zone.credentials;
        creds.validate_format(self.provider_name())?;

        self.delete(
            &creds.api_token,
            &format!("/zones/{}/dns_records/{external_id}", creds.zone_id),
            Self::zone_context(&creds.zone_id, None),
        )
        .await?;
        log::info!("[cloudflare] deleted record id={external_id}");
        Ok(())
    }

    async fn verify_credentials(&self, credentials: &ZoneCredentials) -> Result<ZoneInfo> {
        credentials.validate_format(self.provider_name())?;

        let response = self
            .get::<CloudflareZone>(
                &credentials.api_token,
                &format!("/zones/{}", credentials.zone_id),
                Self::zone_context(&credentials.zone_id, None),
            )
            .await?;

        let zone = response
            .result
            .ok_or_else(|| self.parse_error("响应中缺少 result 字段"))?;
        Ok(ZoneInfo {
            id: zone.id,
            name: zone.name,
            status: zone.status,
        })
    }

    async fn list_records(&self, zone: &Zone) -> Result<Vec<ExternalRecord>> {
        let creds = &zone.credentials;
        creds.validate_format(self.provider_name())?;

        let response = self
            .get::<Vec<CloudflareDnsRecord>>(
                &creds.api_token,
                &format!(
                    "/zones/{}/dns_records?per_page={MAX_PAGE_SIZE_RECORDS}",
                    creds.zone_id
                ),
                Self::zone_context(&creds.zone_id, None),
            )
            .await?;

        let records = response.result.unwrap_or_default();
        if let Some(total) = response.result_info.map(|i| i.total_count)
            && total as usize > records.len()
        {
            log::warn!(
                "[cloudflare] zone {} has {total} records, only the first {} were listed",
                zone.root_domain,
                records.len()
            );
        }
        Ok(records.into_iter().map(ExternalRecord::from).collect())
    }
}
