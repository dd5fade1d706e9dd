//! Subcommand handlers

use anyhow::{Result, bail};

use subzone_app::AppState;
use subzone_core::types::{NewRecord, RecordUpdate};
use subzone_core::validation::{normalize_name, validate_record_name, validate_target};

use crate::output::{self, Output};
use crate::{CredentialArgs, DomainCommand, RecordCommand};

pub async fn domain(cmd: DomainCommand, state: &AppState, out: &Output) -> Result<()> {
    let service = &state.domain_service;
    match cmd {
        DomainCommand::Add {
            root_domain,
            credentials,
        } => {
            let domain = service
                .create_domain(&root_domain, credentials.token, credentials.zone_id)
                .await?;
            out.emit(&domain, |d| {
                format!("Registered {} ({})\n{}", d.root_domain, output::backend(d), d.id)
            })
        }

        DomainCommand::List { user: Some(user) } => {
            let domains = service.user_domains(&user).await?;
            out.emit(domains.as_slice(), output::domain_table)
        }

        DomainCommand::List { user: None } => {
            let domains = service.list_domains().await?;
            out.emit(domains.as_slice(), output::domain_table)
        }

        DomainCommand::Status { domain_id, status } => {
            let domain = service.update_domain_status(&domain_id, status).await?;
            out.emit(&domain, output::domain_line)
        }

        DomainCommand::Credentials {
            domain_id,
            credentials,
        } => {
            let domain = service
                .update_credentials(&domain_id, credentials.token, credentials.zone_id)
                .await?;
            out.emit(&domain, |d| {
                format!("Credentials for {} updated ({})", d.root_domain, output::backend(d))
            })
        }

        DomainCommand::Delete { domain_id } => {
            let domain = service.get_domain(&domain_id).await?;
            service.delete_domain(&domain_id).await?;
            out.emit(&domain, |d| format!("Deleted {}", d.root_domain))
        }

        DomainCommand::Assign { domain_id, user } => {
            let assignment = service.assign_domain(&domain_id, &user).await?;
            out.emit(&assignment, output::assignment)
        }

        DomainCommand::Unassign { domain_id, user } => {
            service.unassign_domain(&domain_id, &user).await?;
            out.emit(
                &serde_json::json!({ "domainId": &domain_id, "userId": &user }),
                |_| format!("User {user} unassigned from domain {domain_id}"),
            )
        }

        DomainCommand::Verify {
            domain_id,
            credentials,
        } => {
            let info = match (domain_id, credentials) {
                (Some(domain_id), _) => service.verify_domain(&domain_id).await?,
                (
                    None,
                    CredentialArgs {
                        token: Some(token),
                        zone_id: Some(zone_id),
                    },
                ) => service.verify_credentials(&token, &zone_id).await?,
                (None, _) => bail!("Either a domain ID or --token and --zone-id are required"),
            };
            out.emit(&info, output::zone_info)
        }

        DomainCommand::Records { domain_id } => {
            let records = state.orchestrator.list_external_records(&domain_id).await?;
            out.emit(records.as_slice(), output::external_table)
        }
    }
}

pub async fn record(cmd: RecordCommand, state: &AppState, out: &Output) -> Result<()> {
    let orchestrator = &state.orchestrator;
    match cmd {
        RecordCommand::Check { domain_id, name } => {
            let result = orchestrator
                .check_availability(&name, &domain_id)
                .await?;
            out.emit(&result, output::availability)
        }

        RecordCommand::Create {
            domain_id,
            name,
            record_type,
            target,
            user,
            allow_reserved,
        } => {
            let name = if allow_reserved {
                normalize_name(&name)
            } else {
                validate_record_name(&name)?
            };
            let target = validate_target(record_type, &target)?;

            let outcome = orchestrator
                .create(NewRecord {
                    user_id: user,
                    domain_id,
                    name,
                    record_type,
                    target,
                })
                .await?;
            out.emit(&outcome, |o| {
                format!(
                    "{}\n{}",
                    output::provisioned("Created", &o.value.full_name, o),
                    o.value.id
                )
            })
        }

        RecordCommand::Update {
            record_id,
            record_type,
            target,
        } => {
            let target = validate_target(record_type, &target)?;
            let outcome = orchestrator
                .update(
                    &record_id,
                    RecordUpdate {
                        record_type,
                        target,
                    },
                )
                .await?;
            out.emit(&outcome, |o| {
                output::provisioned("Updated", &o.value.full_name, o)
            })
        }

        RecordCommand::Delete { record_id } => {
            let record = orchestrator.get_record(&record_id).await?;
            let outcome = orchestrator.delete(&record_id).await?;
            out.emit(&outcome, |o| {
                output::provisioned("Deleted", &record.full_name, o)
            })
        }

        RecordCommand::List { user, domain } => {
            let records = match (user, domain) {
                (Some(user), domain) => {
                    orchestrator
                        .list_user_records(&user, domain.as_deref())
                        .await?
                }
                (None, Some(domain)) => orchestrator.list_domain_records(&domain).await?,
                (None, None) => orchestrator.list_all_records().await?,
            };
            out.emit(records.as_slice(), output::record_table)
        }
    }
}

