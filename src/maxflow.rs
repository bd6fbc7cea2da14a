/// Ford-Fulkerson maximum flow over a dense capacity matrix.
///
/// Vertices are numbered `0..vertices`; all edges have unit capacity.
/// Augmenting paths are found breadth-first from the source, respecting
/// the residual capacity `cap[u][v] - flow[u][v] + flow[v][u]`. Used here
/// for bipartite matching only, so the flow never exceeds the smaller
/// side of the partition.
pub struct MaxFlow {
    vertices: usize,
    capacity: Vec<i32>,
    flow: Vec<i32>,
}

impl MaxFlow {
    #[must_use]
    pub fn new(vertices: usize) -> MaxFlow {
        MaxFlow {
            vertices,
            capacity: vec![0; vertices * vertices],
            flow: vec![0; vertices * vertices],
        }
    }

    /// Add a unit-capacity edge from `u` to `v`.
    pub fn add_edge(&mut self, u: usize, v: usize) {
        self.capacity[u * self.vertices + v] = 1;
    }

    /// Compute the maximum flow from `source` to `sink`.
    pub fn max_flow(&mut self, source: usize, sink: usize) -> usize {
        let n = self.vertices;
        self.flow.iter_mut().for_each(|f| *f = 0);

        let mut total = 0;
        loop {
            // find an augmenting path
            let mut prev = vec![usize::MAX; n];
            let mut queue = Vec::with_capacity(n);
            prev[source] = source;
            queue.push(source);

            let mut head = 0;
            while head < queue.len() && prev[sink] == usize::MAX {
                let u = queue[head];
                head += 1;
                for v in 0..n {
                    if prev[v] == usize::MAX
                        && self.flow[u * n + v] - self.flow[v * n + u] < self.capacity[u * n + v]
                    {
                        prev[v] = u;
                        queue.push(v);
                    }
                }
            }

            if prev[sink] == usize::MAX {
                break;
            }

            // push the bottleneck along the path
            let mut bottleneck = i32::MAX;
            let mut v = sink;
            while v != source {
                let u = prev[v];
                let residual =
                    self.capacity[u * n + v] - self.flow[u * n + v] + self.flow[v * n + u];
                bottleneck = bottleneck.min(residual);
                v = u;
            }

            let mut v = sink;
            while v != source {
                let u = prev[v];
                self.flow[u * n + v] += bottleneck;
                v = u;
            }

            total += bottleneck as usize;
        }

        total
    }
}
