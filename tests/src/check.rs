mod reachability;
mod release;
