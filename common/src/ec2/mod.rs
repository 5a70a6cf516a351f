//! EC2 volume inventory across regions.

use async_trait::async_trait;
use rusoto_core::Region;
use rusoto_ec2::{DescribeVolumesRequest, DescribeVolumesResult, Ec2, Ec2Client, Filter, Volume};

/// Largest page `DescribeVolumes` is asked for.
pub const DESCRIBE_VOLUMES_PAGE_SIZE: i64 = 100;

#[derive(Debug, thiserror::Error)]
pub enum Ec2Error {
    #[error("{0:#}")]
    Unknown(anyhow::Error),
}

/// The slice of the EC2 API needed to list volumes.
#[async_trait]
pub trait VolumeDescriber
where
    Self: Sync + Send,
{
    async fn describe_volumes(
        &self,
        input: DescribeVolumesRequest,
    ) -> Result<DescribeVolumesResult, Ec2Error>;
}

#[async_trait]
impl VolumeDescriber for Ec2Client {
    async fn describe_volumes(
        &self,
        input: DescribeVolumesRequest,
    ) -> Result<DescribeVolumesResult, Ec2Error> {
        Ec2::describe_volumes(self, input)
            .await
            .map_err(|e| Ec2Error::Unknown(anyhow::anyhow!(e)))
    }
}

/// Builds a `(name, values)` filter for `DescribeVolumes`.
pub fn volume_filter(name: &str, values: &[&str]) -> Filter {
    Filter {
        name: Some(name.to_owned()),
        values: Some(values.iter().map(|v| v.to_string()).collect()),
    }
}

/// Collects every volume matching `filters` in each of `regions`, following `NextToken` until
/// the last page. `describer_for` builds the client used for one region.
pub async fn load_all_volumes<D, F>(
    describer_for: F,
    filters: &[Filter],
    regions: &[Region],
) -> Result<Vec<Volume>, Ec2Error>
where
    D: VolumeDescriber,
    F: Fn(&Region) -> D,
{
    let mut volumes = Vec::new();

    for region in regions {
        let describer = describer_for(region);
        let mut next_token: Option<String> = None;

        loop {
            let page = describer
                .describe_volumes(DescribeVolumesRequest {
                    filters: Some(filters.to_vec()),
                    max_results: Some(DESCRIBE_VOLUMES_PAGE_SIZE),
                    next_token: next_token.take(),
                    ..Default::default()
                })
                .await
                .map_err(|Ec2Error::Unknown(e)| {
                    Ec2Error::Unknown(e.context(format!(
                        "unable to describe volumes in {}",
                        region.name()
                    )))
                })?;

            let page_volumes = page.volumes.unwrap_or_default();
            tracing::debug!(
                region = region.name(),
                count = page_volumes.len(),
                "loaded page of volumes"
            );
            volumes.extend(page_volumes);

            match page.next_token {
                Some(token) if !token.is_empty() => next_token = Some(token),
                _ => break,
            }
        }
    }

    Ok(volumes)
}
