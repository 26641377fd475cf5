use provenance_core::AllocationError;
use snafu::{Location, Snafu};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Snafu, Debug)]
#[snafu(visibility(pub))]
pub enum Error {
    #[snafu(display("Failed to allocate a traceability code"))]
    Allocation {
        #[snafu(implicit)]
        location: Location,
        source: AllocationError,
    },
    #[snafu(display("Failed to build the zone lookup client"))]
    ZoneLookupClient {
        #[snafu(implicit)]
        location: Location,
        source: seaport_client::Error,
    },
}
