//! Services - the resolution, assembly, query and threading engines.

pub mod assembler;
pub mod duplicate;
pub mod filter;
pub mod resolver;
pub mod thread;
pub mod tree;
pub mod users;

use crate::error::DomainError;
use crate::ports::Repositories;

pub use assembler::{PostQuestion, Posted, RecordAssembler};
pub use filter::{FilterQueryEngine, FilterTable, QueryOutcome};
pub use resolver::{
    CategoryInput, CategoryRef, LocationInput, LocationRef, ReferenceResolver, ResolverPolicy,
};
pub use thread::{
    AnswerDetails, EditOutcome, QuestionDetails, ThreadEngine, VoteAction, VoteOutcome,
};
pub use tree::AnswerThread;
pub use users::UserService;

/// All services, wired over one set of repositories.
#[derive(Clone)]
pub struct Services {
    pub resolver: ReferenceResolver,
    pub assembler: RecordAssembler,
    pub queries: FilterQueryEngine,
    pub threads: ThreadEngine,
    pub users: UserService,
}

impl Services {
    /// Wire the services. Fails if the filter routing table is malformed.
    pub fn new(repos: &Repositories, policy: ResolverPolicy) -> Result<Self, DomainError> {
        let resolver = ReferenceResolver::new(repos, policy);
        Ok(Self {
            assembler: RecordAssembler::new(repos, resolver.clone()),
            queries: FilterQueryEngine::new(repos, FilterTable::questions()?),
            threads: ThreadEngine::new(repos),
            users: UserService::new(repos),
            resolver,
        })
    }
}
