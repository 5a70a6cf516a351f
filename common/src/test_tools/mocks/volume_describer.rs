use crate::ec2::{Ec2Error, VolumeDescriber};
use async_trait::async_trait;
use mockall::mock;
use rusoto_ec2::{DescribeVolumesRequest, DescribeVolumesResult};

mock! {
    pub VolumeDescriber {}

    #[async_trait]
    impl VolumeDescriber for VolumeDescriber {
        async fn describe_volumes(
            &self,
            input: DescribeVolumesRequest,
        ) -> Result<DescribeVolumesResult, Ec2Error>;
    }
}
