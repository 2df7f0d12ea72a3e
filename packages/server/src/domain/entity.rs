//! Entities: Room and its Members.

use super::{
    error::RepositoryError,
    message_pusher::PusherChannel,
    value_object::{ClientId, RoomId},
};

/// A connection attached to a room.
#[derive(Debug, Clone)]
pub struct Member {
    pub id: ClientId,
    /// `false` until the connection sends `join`.
    pub joined: bool,
    pub channel: PusherChannel,
}

impl Member {
    pub fn new(id: ClientId, channel: PusherChannel) -> Self {
        Self {
            id,
            joined: false,
            channel,
        }
    }

    pub fn recipient(&self) -> Recipient {
        Recipient {
            client_id: self.id.clone(),
            channel: self.channel.clone(),
        }
    }
}

/// Snapshot of a member used as a broadcast target.
#[derive(Debug, Clone)]
pub struct Recipient {
    pub client_id: ClientId,
    pub channel: PusherChannel,
}

/// A group of connections that see each other's presence.
///
/// Members are kept in attach order, which is the order of every `users` list.
#[derive(Debug, Clone)]
pub struct Room {
    pub id: RoomId,
    pub members: Vec<Member>,
}

impl Room {
    pub fn new(id: RoomId) -> Self {
        Self {
            id,
            members: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn contains(&self, client_id: &ClientId) -> bool {
        self.member(client_id).is_some()
    }

    pub fn member(&self, client_id: &ClientId) -> Option<&Member> {
        self.members.iter().find(|m| &m.id == client_id)
    }

    /// Attach a new, not yet joined member.
    pub fn add_member(&mut self, member: Member) -> Result<(), RepositoryError> {
        if self.contains(&member.id) {
            return Err(RepositoryError::DuplicateClientId(
                member.id.into_string(),
            ));
        }
        self.members.push(member);
        Ok(())
    }

    /// Mark a member joined. Joining twice keeps the member where it is.
    pub fn mark_joined(&mut self, client_id: &ClientId) -> Result<(), RepositoryError> {
        let member = self
            .members
            .iter_mut()
            .find(|m| &m.id == client_id)
            .ok_or_else(|| RepositoryError::MemberNotFound(client_id.as_str().to_string()))?;
        member.joined = true;
        Ok(())
    }

    pub fn remove_member(&mut self, client_id: &ClientId) -> Option<Member> {
        let index = self.members.iter().position(|m| &m.id == client_id)?;
        Some(self.members.remove(index))
    }

    pub fn joined_client_ids(&self) -> Vec<ClientId> {
        self.members
            .iter()
            .filter(|m| m.joined)
            .map(|m| m.id.clone())
            .collect()
    }

    pub fn joined_recipients(&self) -> Vec<Recipient> {
        self.members
            .iter()
            .filter(|m| m.joined)
            .map(Member::recipient)
            .collect()
    }
}
