//! Solidity declarations of the identity registry events.

use alloy_sol_types::sol;

sol! {
    /// The ERC-8004 identity registry.
    interface IIdentityRegistry {
        /// Emitted when a new agent is registered.
        event Registered(uint256 indexed agentId, string agentURI, address indexed owner);

        /// Emitted when an agent URI is replaced.
        event URIUpdated(uint256 indexed agentId, string newURI, address indexed updatedBy);
    }
}
